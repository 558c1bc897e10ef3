pub mod bubble;
pub mod input_box;
pub mod login;
pub mod toast;
pub mod transcript;

pub use input_box::{InputBox, InputEvent};
pub use login::{LoginEvent, LoginForm, LoginView};
pub use toast::ActiveToast;
pub use transcript::{TranscriptState, TranscriptView};
