//! Device payload fixtures.
//!
//! Shapes follow what a device management API returns for a statistics
//! request: `entries` collections keyed by self-link URLs, values wrapped in
//! `nestedStats` / `value` / `description` scaffolding.

use serde_json::{json, Value};

/// `sys/tmm-info` stats for two TMM instances.
pub fn tmm_info() -> Value {
    json!({
        "kind": "tm:sys:tmm-info:tmm-infostats",
        "selfLink": "https://localhost/mgmt/tm/sys/tmm-info/stats?ver=15.1.0",
        "entries": {
            "https://localhost/mgmt/tm/sys/tmm-info/0.0/stats": {
                "nestedStats": {
                    "entries": {
                        "cpuId": {"value": 0},
                        "memoryTotal": {"value": 1000},
                        "memoryUsed": {"value": 250},
                        "oneMinAverageUsageRatio": {"value": 4},
                        "tmmId": {"description": "0.0"}
                    }
                }
            },
            "https://localhost/mgmt/tm/sys/tmm-info/0.1/stats": {
                "nestedStats": {
                    "entries": {
                        "cpuId": {"value": 1},
                        "memoryTotal": {"value": 1000},
                        "memoryUsed": {"value": 750},
                        "oneMinAverageUsageRatio": {"value": 8},
                        "tmmId": {"description": "0.1"}
                    }
                }
            }
        }
    })
}

/// `ltm/virtual` stats for a single virtual server.
pub fn virtual_stats() -> Value {
    json!({
        "kind": "tm:ltm:virtual:virtualcollectionstats",
        "entries": {
            "https://localhost/mgmt/tm/ltm/virtual/~Common~app_vs/stats": {
                "nestedStats": {
                    "entries": {
                        "clientside.bitsIn": {"value": 1024},
                        "clientside.bitsOut": {"value": 2048},
                        "clientside.curConns": {"value": 3},
                        "status.availabilityState": {"description": "available"},
                        "status.enabledState": {"description": "enabled"},
                        "tmName": {"description": "/Common/app_vs"}
                    }
                }
            }
        }
    })
}

/// `sys/disk/logical-disk` style list that needs an array → map pivot.
pub fn disk_list() -> Value {
    json!([
        {"name": "HD1", "size": 953869, "vgInUse": 30720},
        {"name": "HD2", "size": 953869, "vgInUse": 0}
    ])
}

/// Nest `leaf` under `depth` single-key mappings that are not scaffolding.
pub fn deep_payload(depth: usize, leaf: Value) -> Value {
    (0..depth).fold(leaf, |inner, i| json!({ format!("level{i}"): inner }))
}
