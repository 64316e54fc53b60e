/// Display languages for the site
pub mod lang;
