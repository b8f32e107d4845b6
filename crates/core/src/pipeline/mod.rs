pub mod compare_media_use_case;
pub mod pipeline_logger;
