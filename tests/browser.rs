use pokedex_browser::{
    resolve, species_detail, DataRepository, EvolutionChain, PokedexServer, PokemonType,
};
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::{json, Value};
use std::path::PathBuf;

fn repo() -> &'static DataRepository {
    DataRepository::bundled().expect("bundled dataset should decode")
}

fn chain_ids(chains: &[EvolutionChain]) -> Vec<Vec<u32>> {
    chains
        .iter()
        .map(|c| c.species.iter().map(|n| n.species_id).collect())
        .collect()
}

#[rstest]
#[case::linear_with_mega(1, vec![vec![1, 2, 3, 10033]])]
#[case::from_the_middle(2, vec![vec![1, 2, 3, 10033]])]
#[case::branching(133, vec![vec![133, 134], vec![133, 135], vec![133, 700]])]
#[case::baby_line(25, vec![vec![172, 25, 26]])]
#[case::single_member_lineage(128, vec![vec![128]])]
#[case::no_lineage(132, vec![vec![132]])]
fn test_chains_for_species(#[case] id: u32, #[case] expected: Vec<Vec<u32>>) {
    let detail = species_detail(repo(), id).unwrap();
    assert_eq!(chain_ids(&detail.evolution.chains), expected);
}

#[test]
fn test_chain_links_carry_conditions() {
    let detail = species_detail(repo(), 172).unwrap();
    let chain = &detail.evolution.chains[0];
    assert_eq!(chain.links, vec!["Friendship 220+", "Use Thunder Stone"]);

    let detail = species_detail(repo(), 700).unwrap();
    let sylveon = &detail.evolution.chains[2];
    assert_eq!(sylveon.links, vec!["Knows a Fairy-type move"]);
}

#[test]
fn test_search_prefix() {
    let names: Vec<String> = repo().search("pi", 40).into_iter().map(|h| h.name).collect();
    assert_eq!(names, vec!["Pichu", "Pikachu"]);

    let mega = repo().search("mega", 40);
    assert_eq!(mega.len(), 1);
    assert_eq!(mega[0].id, 10033);
}

#[test]
fn test_oras_availability() {
    let hits = repo().search("tapu", 40);
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id, 785);
    assert!(!hits[0].oras_available);
    assert!(repo().search("tauros", 40)[0].oras_available);

    let koko = species_detail(repo(), 785).unwrap();
    assert!(!koko.oras_available);
    let abilities: Vec<(&str, bool)> = koko
        .abilities
        .iter()
        .map(|a| (a.name.as_str(), a.post_oras))
        .collect();
    assert_eq!(abilities, vec![("Electric Surge", true), ("Telepathy", false)]);

    let tauros = species_detail(repo(), 128).unwrap();
    assert!(tauros.oras_available);
    let post_oras_moves: Vec<&str> = tauros
        .level_moves
        .iter()
        .filter(|m| m.post_oras)
        .map(|m| m.name.as_str())
        .collect();
    assert_eq!(post_oras_moves, vec!["Raging Bull"]);
    assert!(tauros.to_string().contains("Raging Bull"));
    assert!(tauros.to_string().contains("[post-ORAS]"));
}

#[test]
fn test_gengar_matchups() {
    let detail = species_detail(repo(), 94).unwrap();
    assert_eq!(detail.types, vec![PokemonType::Ghost, PokemonType::Poison]);

    let immune: Vec<PokemonType> = detail
        .type_matchups
        .immunities
        .iter()
        .map(|m| m.attack_type)
        .collect();
    assert_eq!(immune, vec![PokemonType::Normal, PokemonType::Fighting]);
    assert_eq!(detail.type_matchups, resolve(&detail.types).unwrap());
}

#[test]
fn test_runtime_data_dir_matches_bundle() {
    let data_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data");
    let loaded = DataRepository::load_dir(&data_dir).unwrap();
    assert_eq!(loaded.len(), repo().len());

    for record in repo().all_species() {
        let from_bundle = species_detail(repo(), record.id).unwrap();
        let from_dir = species_detail(&loaded, record.id).unwrap();
        assert_eq!(from_bundle, from_dir);
    }
}

#[test]
fn test_every_species_has_a_detail_view() {
    for record in repo().all_species() {
        let detail = species_detail(repo(), record.id).unwrap();
        assert_eq!(detail.stats.len(), 6);
        assert!(!detail.evolution.chains.is_empty());
        assert!(detail
            .evolution
            .chains
            .iter()
            .any(|c| c.species.iter().any(|n| n.species_id == record.id)));
    }
}

#[test]
fn test_server_session() {
    let server = PokedexServer::new(repo(), 40);
    let requests = [
        json!({"jsonrpc": "2.0", "id": 1, "method": "initialize", "params": {}}),
        json!({"jsonrpc": "2.0", "id": 2, "method": "tools/call",
               "params": {"name": "type_matchups", "arguments": {"types": ["Ghost", "poison"]}}}),
        json!({"jsonrpc": "2.0", "id": 3, "method": "shutdown"}),
    ];
    let input: String = requests.iter().map(|r| format!("{}\n", r)).collect();

    let mut output = Vec::new();
    server.run(input.as_bytes(), &mut output).unwrap();
    let responses: Vec<Value> = String::from_utf8(output)
        .unwrap()
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();

    assert_eq!(responses.len(), 3);
    assert_eq!(responses[0]["result"]["serverInfo"]["name"], json!("pokedex-browser"));

    let text = responses[1]["result"]["content"][0]["text"].as_str().unwrap();
    let matchups: Value = serde_json::from_str(text).unwrap();
    assert_eq!(matchups["immunities"][0]["attack_type"], json!("Normal"));

    assert_eq!(responses[2]["error"]["code"], json!(-32601));
}
