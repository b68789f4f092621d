pub mod client;
pub mod image;
pub mod lyrics;

pub use client::OpenAiHttpClient;
pub use image::OpenAiImageClient;
pub use lyrics::OpenAiLyricsClient;
