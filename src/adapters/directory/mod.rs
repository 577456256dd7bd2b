pub mod toml_user_directory;
