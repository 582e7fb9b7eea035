mod accel_log;

pub use accel_log::AccelerationLog;
