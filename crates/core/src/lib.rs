pub mod shared {
    pub mod config;
    pub mod constants;
    pub mod frame;
    pub mod geometry;
    pub mod record;
}

pub mod codec {
    pub mod domain {
        pub mod image_codec;
    }
    pub mod infrastructure;
}

pub mod detection {
    pub mod domain {
        pub mod face_detection;
        pub mod model_runner;
        pub mod tensor_decoder;
        pub mod validation;
    }
    pub mod infrastructure;
}

pub mod dispatch {
    pub mod domain {
        pub mod present_message;
        pub mod presenter_channel;
    }
    pub mod infrastructure;
}

pub mod pipeline {
    pub mod detect_stage;
    pub mod publish_stage;
    pub mod record_sink;
    pub mod infrastructure;
}
