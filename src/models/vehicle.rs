use sqlx::FromRow;
use uuid::Uuid;

/// The columns of `vehicles` this service reads. The table itself is owned by
/// the management API.
#[derive(Debug, FromRow)]
pub struct Vehicle {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub speed_limit: Option<f64>,
}

/// Derived motion status, overwritten on every successful ingest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VehicleStatus {
    Active,
    Parked,
}

impl VehicleStatus {
    pub fn from_motion(is_moving: bool) -> Self {
        if is_moving {
            Self::Active
        } else {
            Self::Parked
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Parked => "parked",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_follows_motion_flag() {
        assert_eq!(VehicleStatus::from_motion(true), VehicleStatus::Active);
        assert_eq!(VehicleStatus::from_motion(false), VehicleStatus::Parked);
        assert_eq!(VehicleStatus::Active.as_str(), "active");
        assert_eq!(VehicleStatus::Parked.as_str(), "parked");
    }
}
