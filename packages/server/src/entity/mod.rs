pub mod client;
pub mod clip;
pub mod kol;
pub mod kol_group;
pub mod kol_group_member;
pub mod post;
pub mod project;
pub mod shoot;
