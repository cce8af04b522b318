pub mod init_config;
pub mod locate;
pub mod options;
pub mod report;
pub mod scan;
pub mod util;

pub use init_config::*;
pub use locate::*;
pub use options::*;
pub use report::*;
pub use scan::*;
pub use util::*;
