pub mod powston;
pub mod topic;

#[cfg(test)]
mod test {
    use crate::powston::dto::InverterState;
    use crate::powston::topics::inverter_state_topic;

    #[test]
    fn test_decode_inverter_state() {
        let topic = inverter_state_topic("acct1", "inverter_1");
        let decoded = topic
            .decode(r#"{"house_power": 2500, "action": "export", "forecast": [0.1, 0.2]}"#)
            .unwrap();

        assert_eq!(
            decoded,
            InverterState {
                house_power: Some(2500.0),
                action: Some("export".to_string()),
                forecast: Some(vec![0.1, 0.2]),
                ..Default::default()
            }
        );
    }

    #[test]
    fn test_decode_rejects_non_object() {
        let topic = inverter_state_topic("acct1", "inverter_1");

        assert!(topic.decode("not json").is_err());
        assert!(topic.decode("[1, 2, 3]").is_err());
        assert!(topic
            .decode("[null, null, null, null, null, null, null, null, null]")
            .is_err());
    }

    #[test]
    fn test_decode_null_and_unknown_fields() {
        let topic = inverter_state_topic("acct1", "inverter_1");
        let decoded = topic
            .decode(r#"{"battery_soc": null, "grid_power": -850.5, "mode": "auto"}"#)
            .unwrap();

        assert_eq!(
            decoded,
            InverterState {
                grid_power: Some(-850.5),
                ..Default::default()
            }
        );
    }

    #[test]
    fn test_decode_rejects_wrong_field_type() {
        let topic = inverter_state_topic("acct1", "inverter_1");

        assert!(topic.decode(r#"{"house_power": "lots"}"#).is_err());
    }
}
