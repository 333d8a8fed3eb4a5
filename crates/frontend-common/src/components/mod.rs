mod spinner;

pub use spinner::LoadingSpinner as Spinner;
