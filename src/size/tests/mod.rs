mod errors_tests;
mod sniff_tests;
