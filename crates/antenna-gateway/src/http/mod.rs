#[cfg(test)]
pub mod capture;
pub mod dispatch;
pub mod guard;
pub mod health;
pub mod signature;
