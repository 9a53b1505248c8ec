pub mod filter;
pub mod presets;
pub mod process_image;

pub use filter::{handle_filter, FilterRequest, SettingsBody, SettingsOverrides, __path_handle_filter};
pub use presets::{handle_presets, PresetResponse, __path_handle_presets};
pub use process_image::{
    handle_process_image, ErrorResponse, ProcessImageRequest, ProcessedImageResponse,
    __path_handle_process_image,
};
