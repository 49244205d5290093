pub mod identity_removal;
