fn main() -> Result<(), hproxy_rotator::RotatorError> {
    hproxy_rotator::run()
}
