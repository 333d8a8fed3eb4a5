//! App-level UI components

mod toast;

pub use toast::{ToastAction, ToastList, ToastStack};
