pub mod backend;
pub mod format;
pub mod http;
pub mod protocol;
pub mod server;
pub mod tools;
pub mod validate;

#[cfg(test)]
pub(crate) mod test_support;
