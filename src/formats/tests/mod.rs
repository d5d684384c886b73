mod gif_tests;
mod heif_tests;
