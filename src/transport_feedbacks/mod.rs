pub mod congestion_control_feedback;
pub mod rapid_resynchronization_request;
pub mod transport_layer_cc;
pub mod transport_layer_nack;
