pub mod app_dir;
