/// Default HTTP listen host
pub const DEFAULT_HOST: &str = "0.0.0.0";
/// Default HTTP listen port
pub const DEFAULT_PORT: u16 = 8080;
/// Default maximum accepted JSON body size (1 MiB)
pub const DEFAULT_MAX_BODY_BYTES: usize = 1024 * 1024;

/// Default gRPC endpoint of the authentication service
pub const DEFAULT_AUTH_ENDPOINT: &str = "http://auth-service:50001";
/// Default TCP address of the logging service's JSON-RPC listener
pub const DEFAULT_LOG_ADDRESS: &str = "log-service:5001";
/// Default JSON-RPC method invoked on the logging service
pub const DEFAULT_LOG_METHOD: &str = "RPCServer.LogInfo";

/// Default round-trip bound for a single backend call, in milliseconds
pub const DEFAULT_BACKEND_TIMEOUT_MS: u64 = 1_000;
