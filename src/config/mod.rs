//! Configuration module

mod site;

pub use site::AboutConfig;
pub use site::BlogConfig;
pub use site::ContactConfig;
pub use site::ContentConfig;
pub use site::Education;
pub use site::Experience;
pub use site::ServerConfig;
pub use site::ServiceItem;
pub use site::SiteConfig;
pub use site::Skill;
