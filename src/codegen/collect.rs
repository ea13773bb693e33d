//! Collect constructor descriptors from a service's endpoints.
//!
//! Per endpoint the order is: request, response, stream send, stream recv, then each error in declaration order.
//! Absent conversions and conversions without an [`InitDescriptor`] are skipped. Nothing is deduplicated here:
//! two endpoints carrying constructors with the same name both contribute one entry.

use crate::model::{ConversionDescriptor, Endpoint, Endpoints, InitDescriptor};

/// Every conversion slot of an endpoint, in emission order. Absent slots yield `None`.
pub fn endpoint_conversions(endpoint: &Endpoint) -> impl Iterator<Item = Option<&ConversionDescriptor>> {
    let stream = endpoint.stream.as_ref();
    [
        endpoint.request.as_ref(),
        endpoint.response.as_ref(),
        stream.and_then(|s| s.send.as_ref()),
        stream.and_then(|s| s.recv.as_ref()),
    ]
    .into_iter()
    .chain(endpoint.errors.iter().map(|e| e.response.as_ref()))
}

/// Collect the constructors that must be generated for `endpoints`, in emission order.
pub fn collect_inits(endpoints: &Endpoints) -> Vec<&InitDescriptor> {
    let mut inits = Vec::new();
    for endpoint in endpoints {
        inits.extend(
            endpoint_conversions(endpoint)
                .flatten()
                .filter_map(|conversion| conversion.init.as_ref()),
        );
    }
    inits
}
