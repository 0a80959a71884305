pub mod login;
pub mod signup;
pub mod verify;
