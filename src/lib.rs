pub mod cli;
pub mod headless;
pub mod input;
pub mod layout;
pub mod replay;

#[cfg(test)]
mod tests;
