use attitude_estimation::{AttitudeFilter, MahonyFilter, Vec3};

const SAMPLE_PERIOD_US: u32 = 10_000; // 10 ms sample period

fn main() {
    let mut filter = MahonyFilter::<f32>::new();

    for _ in 0..10 {
        // this loop should repeat each time new sensor data is available
        // replace these with actual sensor data
        let accelerometer = Vec3::new(0.0, 0.0, 9.81); // m/s²
        let gyroscope = Vec3::new(0.0, 0.0, 0.0); // rad/s
        let magnetometer = Vec3::new(0.0, 20.0, -40.0); // µT

        let quaternion = filter.update(accelerometer, gyroscope, magnetometer, SAMPLE_PERIOD_US);

        println!(
            "W: {:.4}, X: {:.4}, Y: {:.4}, Z: {:.4}",
            quaternion.w(),
            quaternion.x(),
            quaternion.y(),
            quaternion.z()
        );
    }

    let bias = filter.gyro_bias();
    println!(
        "Gyroscope bias: ({:.4}, {:.4}, {:.4}) rad/s, convention {:?}",
        bias.x(),
        bias.y(),
        bias.z(),
        filter.convention()
    );
}
