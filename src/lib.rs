pub mod collect;
pub mod combine;
pub mod config;
pub mod utils;
pub mod version;

pub mod filter {
    pub mod comments;
}

pub mod io {
    pub mod artifact;
    pub mod statistic;
}
