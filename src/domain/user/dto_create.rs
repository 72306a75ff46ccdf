use crate::domain::geo::GeoPoint;

/// Data for inserting a new user.
///
/// The password arrives already hashed; the repository never sees a
/// plaintext credential. The id and registration timestamp are assigned
/// by the store adapter at insert time.
#[derive(Debug, Clone)]
pub struct CreateUserDto {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
    pub location: GeoPoint,
}
