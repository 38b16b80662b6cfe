//! Milestone difficulty ratings
//!
//! Score awarded the first time an entity (badge, location, Pokemon
//! species) is observed within a session. Entities without an entry score
//! the per-category default, so every first sighting still moves the
//! score monotonically.

use std::collections::HashMap;
use std::sync::LazyLock;

/// Rating for a location with no table entry
pub const DEFAULT_LOCATION_RATING: f64 = 5.0;

/// Rating for a Pokemon species with no table entry
pub const DEFAULT_POKEMON_RATING: f64 = 10.0;

/// Rating for a badge with no table entry
pub const DEFAULT_BADGE_RATING: f64 = 25.0;

/// Gym badges, in league order
const BADGE_RATINGS: &[(&str, f64)] = &[
    ("Boulder Badge", 25.0),
    ("Cascade Badge", 30.0),
    ("Thunder Badge", 35.0),
    ("Rainbow Badge", 40.0),
    ("Soul Badge", 45.0),
    ("Marsh Badge", 50.0),
    ("Volcano Badge", 55.0),
    ("Earth Badge", 60.0),
];

/// Kanto locations, keyed by the normalized (underscored) name
const LOCATION_RATINGS: &[(&str, f64)] = &[
    ("Pallet_Town", 2.0),
    ("Route_1", 3.0),
    ("Viridian_City", 5.0),
    ("Route_2", 5.0),
    ("Viridian_Forest", 8.0),
    ("Pewter_City", 10.0),
    ("Route_3", 10.0),
    ("Mt_Moon", 15.0),
    ("Route_4", 12.0),
    ("Cerulean_City", 15.0),
    ("Route_24", 15.0),
    ("Route_25", 16.0),
    ("Route_5", 16.0),
    ("Route_6", 16.0),
    ("Vermilion_City", 20.0),
    ("S_S_Anne", 22.0),
    ("Route_11", 20.0),
    ("Diglett_Cave", 22.0),
    ("Route_9", 22.0),
    ("Route_10", 22.0),
    ("Rock_Tunnel", 25.0),
    ("Lavender_Town", 25.0),
    ("Pokemon_Tower", 30.0),
    ("Route_8", 24.0),
    ("Route_7", 24.0),
    ("Celadon_City", 28.0),
    ("Rocket_Hideout", 32.0),
    ("Saffron_City", 30.0),
    ("Silph_Co", 38.0),
    ("Route_12", 26.0),
    ("Route_13", 26.0),
    ("Route_14", 27.0),
    ("Route_15", 27.0),
    ("Fuchsia_City", 32.0),
    ("Safari_Zone", 35.0),
    ("Route_16", 28.0),
    ("Route_17", 28.0),
    ("Route_18", 29.0),
    ("Route_19", 33.0),
    ("Route_20", 34.0),
    ("Seafoam_Islands", 40.0),
    ("Cinnabar_Island", 38.0),
    ("Pokemon_Mansion", 42.0),
    ("Route_21", 36.0),
    ("Route_22", 12.0),
    ("Route_23", 45.0),
    ("Power_Plant", 42.0),
    ("Victory_Road", 50.0),
    ("Indigo_Plateau", 55.0),
    ("Cerulean_Cave", 60.0),
];

/// Species ratings, tiered by evolution stage and rarity
const POKEMON_RATINGS: &[(&str, f64)] = &[
    // Starters and their lines
    ("Bulbasaur", 12.0),
    ("Ivysaur", 22.0),
    ("Venusaur", 35.0),
    ("Charmander", 12.0),
    ("Charmeleon", 22.0),
    ("Charizard", 35.0),
    ("Squirtle", 12.0),
    ("Wartortle", 22.0),
    ("Blastoise", 35.0),
    // Early-route commons
    ("Caterpie", 5.0),
    ("Metapod", 8.0),
    ("Butterfree", 15.0),
    ("Weedle", 5.0),
    ("Kakuna", 8.0),
    ("Beedrill", 15.0),
    ("Pidgey", 5.0),
    ("Pidgeotto", 12.0),
    ("Pidgeot", 25.0),
    ("Rattata", 5.0),
    ("Raticate", 12.0),
    ("Spearow", 6.0),
    ("Fearow", 14.0),
    ("Ekans", 8.0),
    ("Arbok", 16.0),
    ("Pikachu", 12.0),
    ("Raichu", 24.0),
    ("Sandshrew", 8.0),
    ("Sandslash", 16.0),
    ("Nidoran F", 8.0),
    ("Nidorina", 15.0),
    ("Nidoqueen", 28.0),
    ("Nidoran M", 8.0),
    ("Nidorino", 15.0),
    ("Nidoking", 28.0),
    ("Clefairy", 12.0),
    ("Clefable", 24.0),
    ("Vulpix", 10.0),
    ("Ninetales", 24.0),
    ("Jigglypuff", 10.0),
    ("Wigglytuff", 20.0),
    ("Zubat", 5.0),
    ("Golbat", 12.0),
    ("Oddish", 7.0),
    ("Gloom", 14.0),
    ("Vileplume", 26.0),
    ("Paras", 8.0),
    ("Parasect", 16.0),
    ("Venonat", 8.0),
    ("Venomoth", 16.0),
    ("Diglett", 8.0),
    ("Dugtrio", 16.0),
    ("Meowth", 8.0),
    ("Persian", 16.0),
    ("Psyduck", 8.0),
    ("Golduck", 18.0),
    ("Mankey", 8.0),
    ("Primeape", 16.0),
    ("Growlithe", 10.0),
    ("Arcanine", 26.0),
    ("Poliwag", 8.0),
    ("Poliwhirl", 15.0),
    ("Poliwrath", 28.0),
    ("Abra", 10.0),
    ("Kadabra", 18.0),
    ("Alakazam", 30.0),
    ("Machop", 9.0),
    ("Machoke", 16.0),
    ("Machamp", 30.0),
    ("Bellsprout", 7.0),
    ("Weepinbell", 14.0),
    ("Victreebel", 26.0),
    ("Tentacool", 8.0),
    ("Tentacruel", 18.0),
    ("Geodude", 7.0),
    ("Graveler", 14.0),
    ("Golem", 28.0),
    ("Ponyta", 10.0),
    ("Rapidash", 20.0),
    ("Slowpoke", 8.0),
    ("Slowbro", 18.0),
    ("Magnemite", 9.0),
    ("Magneton", 18.0),
    ("Farfetchd", 18.0),
    ("Doduo", 8.0),
    ("Dodrio", 16.0),
    ("Seel", 10.0),
    ("Dewgong", 20.0),
    ("Grimer", 8.0),
    ("Muk", 16.0),
    ("Shellder", 9.0),
    ("Cloyster", 22.0),
    ("Gastly", 10.0),
    ("Haunter", 18.0),
    ("Gengar", 32.0),
    ("Onix", 14.0),
    ("Drowzee", 8.0),
    ("Hypno", 16.0),
    ("Krabby", 8.0),
    ("Kingler", 16.0),
    ("Voltorb", 8.0),
    ("Electrode", 16.0),
    ("Exeggcute", 9.0),
    ("Exeggutor", 20.0),
    ("Cubone", 10.0),
    ("Marowak", 18.0),
    ("Hitmonlee", 22.0),
    ("Hitmonchan", 22.0),
    ("Lickitung", 18.0),
    ("Koffing", 8.0),
    ("Weezing", 16.0),
    ("Rhyhorn", 10.0),
    ("Rhydon", 22.0),
    ("Chansey", 25.0),
    ("Tangela", 14.0),
    ("Kangaskhan", 22.0),
    ("Horsea", 8.0),
    ("Seadra", 16.0),
    ("Goldeen", 7.0),
    ("Seaking", 14.0),
    ("Staryu", 8.0),
    ("Starmie", 20.0),
    ("Mr Mime", 20.0),
    ("Scyther", 22.0),
    ("Jynx", 20.0),
    ("Electabuzz", 22.0),
    ("Magmar", 22.0),
    ("Pinsir", 22.0),
    ("Tauros", 20.0),
    ("Magikarp", 5.0),
    ("Gyarados", 30.0),
    ("Lapras", 28.0),
    ("Ditto", 18.0),
    ("Eevee", 15.0),
    ("Vaporeon", 25.0),
    ("Jolteon", 25.0),
    ("Flareon", 25.0),
    ("Porygon", 25.0),
    ("Omanyte", 18.0),
    ("Omastar", 28.0),
    ("Kabuto", 18.0),
    ("Kabutops", 28.0),
    ("Aerodactyl", 30.0),
    ("Snorlax", 30.0),
    // Legendaries
    ("Articuno", 50.0),
    ("Zapdos", 50.0),
    ("Moltres", 50.0),
    ("Dratini", 20.0),
    ("Dragonair", 30.0),
    ("Dragonite", 45.0),
    ("Mewtwo", 60.0),
    ("Mew", 60.0),
];

static RATINGS: LazyLock<HashMap<&'static str, f64>> = LazyLock::new(|| {
    BADGE_RATINGS
        .iter()
        .chain(LOCATION_RATINGS)
        .chain(POKEMON_RATINGS)
        .copied()
        .collect()
});

/// Rating for a milestone name, if it has a table entry
#[must_use]
pub fn rating(name: &str) -> Option<f64> {
    RATINGS.get(name).copied()
}
