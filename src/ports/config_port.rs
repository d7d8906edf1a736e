//! Configuration access port trait.

/// Section/key lookup over a configuration source (INI file, environment).
pub trait ConfigPort {
    fn get_string(&self, section: &str, key: &str) -> Option<String>;
    fn get_int(&self, section: &str, key: &str, default: i64) -> i64;
}
