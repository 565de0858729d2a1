//! Property tests for metadata key ordering and value layouts.

use std::net::Ipv4Addr;

use nimbus_meta::keys;
use nimbus_meta::HostAddr;
use proptest::prelude::*;

fn arb_host() -> impl Strategy<Value = HostAddr> {
    (any::<[u8; 4]>(), any::<u32>()).prop_map(|(ip, port)| HostAddr::new(Ipv4Addr::from(ip), port))
}

proptest! {
    #[test]
    fn tag_keys_sort_newest_first(
        space in any::<i32>(),
        tag in any::<i32>(),
        a in 0i64..,
        b in 0i64..,
    ) {
        prop_assume!(a != b);
        let (ka, kb) = (keys::schema_tag_key(space, tag, a), keys::schema_tag_key(space, tag, b));
        prop_assert_eq!(a > b, ka < kb);
        prop_assert_eq!(keys::parse_tag_version(&ka).unwrap(), a);
    }

    #[test]
    fn edge_keys_sort_oldest_first(
        space in any::<i32>(),
        edge in any::<i32>(),
        a in 0i64..,
        b in 0i64..,
    ) {
        prop_assume!(a != b);
        let ka = keys::schema_edge_key(space, edge, a);
        let kb = keys::schema_edge_key(space, edge, b);
        prop_assert_eq!(a < b, ka < kb);
        prop_assert_eq!(keys::parse_edge_key(&ka).unwrap(), (space, edge, a));
    }

    #[test]
    fn part_value_keeps_every_host_in_order(hosts in prop::collection::vec(arb_host(), 0..16)) {
        let val = keys::part_val(&hosts);
        prop_assert_eq!(val.len(), hosts.len() * keys::HOST_UNIT_SIZE);
        prop_assert_eq!(keys::parse_part_val(&val).unwrap(), hosts);
    }

    #[test]
    fn part_value_length_must_be_whole_hosts(len in 0usize..64) {
        let parsed = keys::parse_part_val(&vec![0u8; len]);
        prop_assert_eq!(parsed.is_ok(), len % keys::HOST_UNIT_SIZE == 0);
    }

    #[test]
    fn decoders_never_panic_on_garbage(bytes in prop::collection::vec(any::<u8>(), 0..40)) {
        let _ = keys::parse_space_id(&bytes);
        let _ = keys::parse_space_val(&bytes);
        let _ = keys::parse_part_key(&bytes);
        let _ = keys::parse_host_key(&bytes);
        let _ = keys::parse_tag_key(&bytes);
        let _ = keys::parse_tag_schema(&bytes);
        let _ = keys::parse_edge_key(&bytes);
        let _ = keys::parse_edge_schema(&bytes);
        let _ = keys::parse_index_key(&bytes);
        let _ = keys::parse_index_val(&bytes);
    }
}
