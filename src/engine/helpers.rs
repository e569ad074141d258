use crate::{
    entities::Location,
    error::{resolution_error, Error, Role},
    external::Geocoder,
};

#[tracing::instrument(skip(geocoder))]
pub async fn resolve_location<G: Geocoder + ?Sized>(
    geocoder: &G,
    name: &str,
    role: Role,
) -> Result<Location, Error> {
    let coordinates = geocoder
        .resolve(name)
        .await?
        .filter(|c| c.is_valid())
        .ok_or_else(|| resolution_error(role, name))?;

    Ok(Location::new(name.into(), coordinates))
}
