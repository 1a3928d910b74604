fn main() {
    // node needs the platform-specific link args for the .node module
    #[cfg(feature = "node")]
    napi_build::setup();
}
