// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let proto_root = "proto";

    println!("cargo:rerun-if-changed={proto_root}/auth.proto");
    println!("cargo:rerun-if-env-changed=BROKER_REGEN_PROTO");

    // The generated code is checked in; regenerate only on request so
    // builds do not require protoc.
    if std::env::var_os("BROKER_REGEN_PROTO").is_none() {
        return Ok(());
    }

    tonic_build::configure()
        .build_server(true)
        .build_client(true)
        .out_dir("src/proto") // generated Rust goes here
        .compile(&[format!("{proto_root}/auth.proto")], &[proto_root])?;

    Ok(())
}
