pub mod deps;
pub mod disk_space;
pub mod humanize;
pub mod interrupt;
pub mod logger;

pub use deps::ffmpeg_available;
pub use disk_space::has_enough_space;
pub use humanize::format_file_size;
pub use interrupt::install_interrupt_handler;
pub use logger::init_logging;
