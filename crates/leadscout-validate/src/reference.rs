//! Reference datasets consulted by the field validators.
//!
//! Each dataset is a plain lookup set or table. The compiled-in defaults
//! cover the common cases; deployments can swap in larger lists. A missing
//! dataset degrades the matching validator's confidence boosts — it never
//! fails validation outright.

use std::collections::{HashMap, HashSet};

const FIRST_NAMES: &[&str] = &[
    "james", "mary", "john", "patricia", "robert", "jennifer", "michael", "linda", "william",
    "elizabeth", "david", "barbara", "richard", "susan", "joseph", "jessica", "thomas", "sarah",
    "charles", "karen", "christopher", "nancy", "daniel", "lisa", "matthew", "margaret",
    "anthony", "betty", "mark", "sandra", "donald", "ashley", "steven", "dorothy", "paul",
    "kimberly", "andrew", "emily", "joshua", "donna", "kenneth", "michelle", "kevin", "carol",
    "brian", "amanda", "george", "melissa", "edward", "deborah", "ronald", "stephanie", "timothy",
    "rebecca", "jason", "laura", "jeffrey", "helen", "ryan", "sharon", "jacob", "cynthia",
    "gary", "kathleen", "nicholas", "amy", "eric", "angela", "jonathan", "anna", "stephen",
    "ruth", "larry", "brenda", "justin", "pamela", "scott", "nicole", "brandon", "katherine",
    "alex", "samantha", "benjamin", "christine", "samuel", "emma", "gregory", "catherine",
    "frank", "debra", "alexander", "rachel", "raymond", "carolyn", "patrick", "janet", "jack",
    "virginia", "dennis", "maria", "jerry", "heather", "tyler", "diane", "aaron", "julie",
    "dana", "olivia",
];

const LAST_NAMES: &[&str] = &[
    "smith", "johnson", "williams", "brown", "jones", "garcia", "miller", "davis", "rodriguez",
    "martinez", "hernandez", "lopez", "gonzalez", "wilson", "anderson", "thomas", "taylor",
    "moore", "jackson", "martin", "lee", "perez", "thompson", "white", "harris", "sanchez",
    "clark", "ramirez", "lewis", "robinson", "walker", "young", "allen", "king", "wright",
    "scott", "torres", "nguyen", "hill", "flores", "green", "adams", "nelson", "baker", "hall",
    "rivera", "campbell", "mitchell", "carter", "roberts", "gomez", "phillips", "evans",
    "turner", "diaz", "parker", "cruz", "edwards", "collins", "reyes", "stewart", "morris",
    "morales", "murphy", "cook", "rogers", "gutierrez", "ortiz", "morgan", "cooper", "peterson",
    "bailey", "reed", "kelly", "howard", "ramos", "kim", "cox", "ward", "richardson", "watson",
];

/// NANP area codes the phone validator recognizes as in service. Not
/// exhaustive; unknown codes simply forgo the confidence boost.
const AREA_CODES: &[&str] = &[
    "201", "202", "203", "205", "206", "207", "212", "213", "214", "215", "216", "217", "224",
    "225", "239", "240", "248", "253", "254", "267", "281", "301", "302", "303", "304", "305",
    "310", "312", "313", "314", "315", "316", "317", "318", "319", "320", "321", "323", "330",
    "336", "337", "347", "351", "352", "360", "386", "401", "402", "404", "405", "406", "407",
    "408", "409", "410", "412", "413", "414", "415", "417", "419", "423", "425", "430", "432",
    "434", "435", "440", "443", "458", "469", "470", "475", "478", "479", "480", "484", "501",
    "502", "503", "504", "505", "507", "508", "509", "510", "512", "513", "515", "516", "517",
    "518", "520", "530", "540", "551", "559", "561", "562", "563", "567", "570", "571", "573",
    "574", "580", "585", "586", "601", "602", "603", "605", "606", "607", "608", "609", "610",
    "612", "614", "615", "616", "617", "618", "619", "620", "623", "626", "630", "631", "636",
    "641", "646", "650", "651", "660", "661", "662", "667", "669", "678", "682", "701", "702",
    "703", "704", "706", "707", "708", "712", "713", "714", "715", "716", "717", "718", "719",
    "720", "724", "727", "731", "732", "734", "737", "740", "747", "754", "757", "760", "762",
    "763", "765", "770", "772", "773", "774", "775", "779", "781", "785", "786", "801", "802",
    "803", "804", "805", "806", "808", "810", "812", "813", "814", "815", "816", "817", "818",
    "828", "830", "831", "832", "843", "845", "847", "848", "850", "856", "857", "858", "859",
    "860", "862", "863", "864", "865", "870", "872", "878", "901", "903", "904", "906", "907",
    "908", "909", "910", "912", "913", "914", "915", "916", "917", "918", "919", "920", "925",
    "928", "929", "931", "936", "937", "940", "941", "947", "949", "951", "952", "954", "956",
    "959", "970", "971", "972", "973", "978", "979", "980", "984", "985", "989",
];

/// Domains whose mailboxes evaporate in minutes. A lead carrying one is the
/// strongest automation/fraud signal available, hence the hard veto.
const DISPOSABLE_DOMAINS: &[&str] = &[
    "mailinator.com",
    "guerrillamail.com",
    "10minutemail.com",
    "tempmail.com",
    "temp-mail.org",
    "throwaway.email",
    "yopmail.com",
    "getnada.com",
    "trashmail.com",
    "sharklasers.com",
    "dispostable.com",
    "maildrop.cc",
    "fakeinbox.com",
    "mintemail.com",
    "mytemp.email",
];

/// Widely used mailbox providers; presence earns a legitimacy boost.
const COMMON_DOMAINS: &[&str] = &[
    "gmail.com",
    "yahoo.com",
    "outlook.com",
    "hotmail.com",
    "icloud.com",
    "aol.com",
    "protonmail.com",
    "comcast.net",
    "verizon.net",
    "msn.com",
];

const STREET_TYPES: &[&str] = &[
    "street", "st", "avenue", "ave", "boulevard", "blvd", "drive", "dr", "lane", "ln", "road",
    "rd", "court", "ct", "circle", "cir", "place", "pl", "way", "terrace", "ter", "parkway",
    "pkwy", "highway", "hwy", "trail", "trl", "loop", "plaza", "square", "sq",
];

const STATE_CODES: &[&str] = &[
    "AL", "AK", "AZ", "AR", "CA", "CO", "CT", "DE", "FL", "GA", "HI", "ID", "IL", "IN", "IA",
    "KS", "KY", "LA", "ME", "MD", "MA", "MI", "MN", "MS", "MO", "MT", "NE", "NV", "NH", "NJ",
    "NM", "NY", "NC", "ND", "OH", "OK", "OR", "PA", "RI", "SC", "SD", "TN", "TX", "UT", "VT",
    "VA", "WA", "WV", "WI", "WY", "DC",
];

/// Abbreviation/misspelling → canonical job title.
const TITLE_ALIASES: &[(&str, &str)] = &[
    ("ceo", "Chief Executive Officer"),
    ("c.e.o.", "Chief Executive Officer"),
    ("chief executive officer", "Chief Executive Officer"),
    ("cfo", "Chief Financial Officer"),
    ("coo", "Chief Operating Officer"),
    ("cto", "Chief Technology Officer"),
    ("cmo", "Chief Marketing Officer"),
    ("pres", "President"),
    ("president", "President"),
    ("vp", "Vice President"),
    ("v.p.", "Vice President"),
    ("vice pres", "Vice President"),
    ("vice president", "Vice President"),
    ("svp", "Senior Vice President"),
    ("evp", "Executive Vice President"),
    ("gm", "General Manager"),
    ("gen mgr", "General Manager"),
    ("mgr", "Manager"),
    ("mngr", "Manager"),
    ("asst mgr", "Assistant Manager"),
    ("dir", "Director"),
    ("exec dir", "Executive Director"),
    ("admin", "Administrator"),
    ("asst", "Assistant"),
    ("hr", "Human Resources"),
    ("hr mgr", "Human Resources Manager"),
    ("owner", "Owner"),
    ("founder", "Founder"),
    ("prinicpal", "Principal"),
    ("principal", "Principal"),
];

/// The lookup sets and tables backing field validation.
#[derive(Debug, Clone)]
pub struct ReferenceData {
    pub first_names: HashSet<String>,
    pub last_names: HashSet<String>,
    pub area_codes: HashSet<String>,
    pub disposable_domains: HashSet<String>,
    pub common_domains: HashSet<String>,
    pub street_types: HashSet<String>,
    pub state_codes: HashSet<String>,
    pub title_aliases: HashMap<String, String>,
}

impl ReferenceData {
    /// The compiled-in defaults.
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            first_names: to_set(FIRST_NAMES),
            last_names: to_set(LAST_NAMES),
            area_codes: to_set(AREA_CODES),
            disposable_domains: to_set(DISPOSABLE_DOMAINS),
            common_domains: to_set(COMMON_DOMAINS),
            street_types: to_set(STREET_TYPES),
            state_codes: to_set(STATE_CODES),
            title_aliases: TITLE_ALIASES
                .iter()
                .map(|(alias, canonical)| ((*alias).to_owned(), (*canonical).to_owned()))
                .collect(),
        }
    }

    /// No datasets at all. Validators still run; they just cannot award
    /// reference-based confidence boosts.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            first_names: HashSet::new(),
            last_names: HashSet::new(),
            area_codes: HashSet::new(),
            disposable_domains: HashSet::new(),
            common_domains: HashSet::new(),
            street_types: HashSet::new(),
            state_codes: HashSet::new(),
            title_aliases: HashMap::new(),
        }
    }
}

impl Default for ReferenceData {
    fn default() -> Self {
        Self::builtin()
    }
}

fn to_set(items: &[&str]) -> HashSet<String> {
    items.iter().map(|s| (*s).to_owned()).collect()
}
