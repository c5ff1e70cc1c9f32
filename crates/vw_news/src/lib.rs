pub mod client;

pub use client::{normalize_vendor, HeadlineQuery, NewsClient, VendorArticle, DEFAULT_NEWS_IMAGE};
