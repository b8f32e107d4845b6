pub mod dashed_container;
pub mod file_row;
pub mod media_box;
pub mod primary_button;
pub mod result_card;
pub mod secondary_button;
