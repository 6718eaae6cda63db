pub mod device_core;
