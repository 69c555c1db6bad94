pub mod dashboard;
pub mod skill_detail;
pub mod skills;
pub mod timeline;
