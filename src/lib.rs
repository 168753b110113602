pub mod configuration;
pub mod error;

pub mod editor {
    pub mod viewport;
    pub mod curveeditor;
}

pub mod math {
    pub mod curve {
        pub mod curve;
        pub mod axisrange;
        pub mod point2d;
        pub mod keyframe {
            pub mod hermite;
            pub mod curveerror;
            pub mod curverecord;
            pub mod animationcurve;
        }
    }
}

pub mod playback {
    pub mod playbackerror;
    pub mod playbackstate;
    pub mod playbackcontroller;
}

pub mod preset {
    pub mod preseterror;
    pub mod presetstore;
}

pub mod session {
    pub mod emulatorsession;
    pub mod tickscheduler;
}

pub mod vehicle {
    pub mod gearposition;
    pub mod vehicleparams;
    pub mod vehiclestate;
    pub mod vehiclemodel;
}

pub use error::{
    EmulatorError,
    Result
};
