pub mod about_tab;
pub mod account_tab;
pub mod appearance_tab;
pub mod detect_tab;
pub mod features_tab;
pub mod home_tab;
