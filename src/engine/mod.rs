mod helpers;
mod route_api;

use crate::{api::API, external::Geocoder};

/// Route planning on top of a geocoder.
#[derive(Debug)]
pub struct Engine<G> {
    geocoder: G,
}

impl<G: Geocoder> Engine<G> {
    pub fn new(geocoder: G) -> Self {
        Self { geocoder }
    }
}

impl<G: Geocoder> API for Engine<G> {}
