pub mod alliedwallet;

pub use self::alliedwallet::Alliedwallet;
