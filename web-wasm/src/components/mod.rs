pub mod action_buttons;
pub mod disease_panel;
pub mod error_banner;
pub mod header;
pub mod image_card;
pub mod processing;
pub mod result_table;
pub mod upload_area;
