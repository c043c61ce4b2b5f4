mod directory;

pub use directory::DirectoryAdapter;
