use crate::tasmota::dto::*;
use powston_display_lib::topic::Topic;

/// Command topics of one display, scoped to the account the update is for.
#[derive(Clone, Debug)]
pub struct TasmotaDisplay {
    pub clear: Topic<DisplayClear>,
    pub text: Topic<DisplayText>,
}

impl TasmotaDisplay {
    pub fn new(tenant: &str, display_id: &str) -> Self {
        Self {
            clear: Topic::new(format!("{tenant}/cmnd/{display_id}/displayclear")),
            text: Topic::new(format!("{tenant}/cmnd/{display_id}/displaytext")),
        }
    }
}
