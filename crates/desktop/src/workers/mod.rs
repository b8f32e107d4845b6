pub mod detect_worker;
