//! Operation names as the engine registers them

pub const READ_LOG_FROM_XES: &str = "ReadLogFromXes";
pub const WRITE_LOG_TO_XES: &str = "WriteLogToXes";

pub const USE_NAMES_EVENT_LOG: &str = "UseNamesEventLog";
pub const GET_NAMES_EVENT_LOG: &str = "GetNamesEventLog";
pub const GET_HASHES_EVENT_LOG: &str = "GetHashesEventLog";
pub const GET_EVENT_LOG_INFO: &str = "GetEventLogInfo";

pub const FIND_PRIMITIVE_TANDEM_ARRAYS: &str = "FindPrimitiveTandemArrays";
pub const FIND_MAXIMAL_TANDEM_ARRAYS: &str = "FindMaximalTandemArrays";
pub const FIND_MAXIMAL_REPEATS: &str = "FindMaximalRepeats";
pub const FIND_SUPER_MAXIMAL_REPEATS: &str = "FindSuperMaximalRepeats";
pub const FIND_NEAR_SUPER_MAXIMAL_REPEATS: &str = "FindNearSuperMaximalRepeats";

pub const DISCOVER_ACTIVITIES: &str = "DiscoverActivities";
pub const DISCOVER_ACTIVITIES_INSTANCES: &str = "DiscoverActivitiesInstances";
pub const CREATE_LOG_FROM_ACTIVITIES: &str = "CreateLogFromActivities";
pub const DISCOVER_ACTIVITIES_FOR_SEVERAL_LEVELS: &str = "DiscoverActivitiesForSeveralLevels";
pub const DISCOVER_ACTIVITIES_FROM_PATTERNS: &str = "DiscoverActivitiesFromPatterns";
pub const DISCOVER_ACTIVITIES_UNTIL_NO_MORE: &str = "DiscoverActivitiesUntilNoMore";
pub const EXECUTE_WITH_EACH_ACTIVITY_LOG: &str = "ExecuteWithEachActivityLog";
pub const SUBSTITUTE_UNDERLYING_EVENTS: &str = "SubstituteUnderlyingEvents";
pub const CLEAR_ACTIVITIES: &str = "ClearActivities";
pub const GET_UNDERLYING_EVENTS_COUNT: &str = "GetUnderlyingEventsCount";

pub const FILTER_TRACES_BY_EVENTS_COUNT: &str = "FilterTracesByEventsCount";
pub const FILTER_EVENTS_BY_NAME: &str = "FilterEventsByName";
pub const FILTER_EVENTS_BY_REGEX: &str = "FilterEventsByRegex";
pub const FILTER_LOG_BY_VARIANTS: &str = "FilterLogByVariants";

pub const ADD_START_END_ARTIFICIAL_EVENTS: &str = "AddStartEndArtificialEvents";
pub const ADD_START_ARTIFICIAL_EVENTS: &str = "AddStartArtificialEvents";
pub const ADD_END_ARTIFICIAL_EVENTS: &str = "AddEndArtificialEvents";

pub const DISCOVER_PETRI_NET_ALPHA: &str = "DiscoverPetriNetAlpha";
pub const DISCOVER_PETRI_NET_ALPHA_PLUS: &str = "DiscoverPetriNetAlphaPlus";
pub const DISCOVER_PETRI_NET_ALPHA_PLUS_PLUS: &str = "DiscoverPetriNetAlphaPlusPlus";
pub const DISCOVER_PETRI_NET_ALPHA_PLUS_PLUS_NFC: &str = "DiscoverPetriNetAlphaPlusPlusNfc";
pub const DISCOVER_PETRI_NET_HEURISTIC: &str = "DiscoverPetriNetHeuristic";
pub const DISCOVER_FUZZY_GRAPH: &str = "DiscoverFuzzyGraph";
pub const DISCOVER_DIRECTLY_FOLLOWS_GRAPH: &str = "DiscoverDirectlyFollowsGraph";
pub const SERIALIZE_PETRI_NET_TO_PNML: &str = "SerializePetriNetToPNML";

pub const TRACES_DIVERSITY_DIAGRAM: &str = "TracesDiversityDiagram";
pub const DRAW_PLACEMENT_OF_EVENT_BY_NAME: &str = "DrawPlacementOfEventByName";
pub const DRAW_PLACEMENT_OF_EVENTS_BY_REGEX: &str = "DrawPlacementOfEventsByRegex";
pub const DRAW_FULL_ACTIVITIES_DIAGRAM: &str = "DrawFullActivitiesDiagram";
pub const DRAW_SHORT_ACTIVITIES_DIAGRAM: &str = "DrawShortActivitiesDiagram";

pub const CLUSTERIZE_ACTIVITIES_FROM_TRACES_DBSCAN: &str = "ClusterizeActivitiesFromTracesDbscan";
pub const CLUSTERIZE_LOG_TRACES_DBSCAN: &str = "ClusterizeLogTracesDbscan";
