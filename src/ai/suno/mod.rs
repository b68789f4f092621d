pub mod client;

pub use client::SunoMusicClient;
