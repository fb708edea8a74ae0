pub(crate) mod steam;

pub use steam::SteamClient;
