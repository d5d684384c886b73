mod seekable_tests;
