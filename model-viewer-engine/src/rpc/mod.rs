//! JSON-RPC 2.0 bridge to the hosting page over `window.postMessage`.
//! Status, progress, and error banners flow out; retry requests and
//! state queries flow in.

pub mod web_rpc;
