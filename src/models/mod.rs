pub mod alert;
pub mod geofence;
pub mod location;
pub mod vehicle;
