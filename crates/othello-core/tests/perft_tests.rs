use othello_core::perft::perft_root;

#[test]
fn test_perft() {
    let expected = [4, 12, 56, 244, 1_396, 8_200, 55_092, 390_216];
    for (depth, &nodes) in (1..).zip(expected.iter()) {
        assert_eq!(perft_root(depth), nodes, "perft({depth})");
    }
}

#[test]
#[ignore = "slow in debug builds"]
fn test_perft_9() {
    assert_eq!(perft_root(9), 3_005_320);
}
