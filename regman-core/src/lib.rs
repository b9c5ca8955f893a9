#![allow(clippy::module_inception)]

pub mod app_ctx;
pub mod blueprint;
pub mod config;
pub mod registry;
pub mod runtime;

pub fn is_default<T: Default + Eq>(val: &T) -> bool {
    *val == T::default()
}

#[async_trait::async_trait]
pub trait FileIO: Send + Sync {
    async fn write<'a>(&'a self, path: &'a str, content: &'a [u8]) -> anyhow::Result<()>;
    async fn read<'a>(&'a self, path: &'a str) -> anyhow::Result<String>;
    async fn exists<'a>(&'a self, path: &'a str) -> anyhow::Result<bool>;
}
