// HTTP middleware
// Author: kelexine (https://github.com/kelexine)

use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};

/// `x-request-id` layers: assign an id to requests that lack one, and echo
/// it on the response so dashboard errors can be matched to gateway logs.
pub fn request_id_layers() -> (SetRequestIdLayer<MakeRequestUuid>, PropagateRequestIdLayer) {
    (
        SetRequestIdLayer::x_request_id(MakeRequestUuid),
        PropagateRequestIdLayer::x_request_id(),
    )
}
