use crate::powston::dto::*;
use crate::topic::Topic;

pub fn inverter_state_topic(username: &str, inverter: &str) -> Topic<InverterState> {
    Topic::new(format!("{username}/powston/{inverter}/state"))
}

/// Account namespace of a Powston topic, i.e. its first path segment.
pub fn tenant_of(topic: &str) -> &str {
    topic.split('/').next().unwrap_or(topic)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_inverter_state_topic() {
        assert_eq!(
            inverter_state_topic("acct1", "inverter_1").name(),
            "acct1/powston/inverter_1/state"
        );
    }

    #[test]
    fn test_tenant_of() {
        assert_eq!(tenant_of("acct1/powston/inverter_1/state"), "acct1");
        assert_eq!(tenant_of("acct1"), "acct1");
        assert_eq!(tenant_of("/powston/x/state"), "");
    }
}
