pub mod notifier;
pub mod window;
