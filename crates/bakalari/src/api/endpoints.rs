//! Endpoint paths of the Bakaláři v3 API.

/// GET, list of API versions the server speaks.
pub const API: &str = "/api";

/// GET, information about the v3 API.
pub const API_V3: &str = "/api/3";

/// GET, the logged-in user.
pub const USER: &str = "/api/3/user";

/// GET, `Subjects`.
pub const SUBJECTS: &str = "/api/3/subjects";

/// GET, `Themes` of one subject.
pub const SUBJECT_THEMES: &str = "/api/3/subjects/themes/{subject_id}";

/// GET, absence summary.
pub const ABSENCE: &str = "/api/3/absence/student";

/// GET, all `Events`.
pub const EVENTS: &str = "/api/3/events";

/// GET, `Events` restricted to `my` or `public`.
pub const EVENTS_SCOPED: &str = "/api/3/events/{scope}";

/// GET, `Commissioners`.
pub const GDPR_COMMISSIONERS: &str = "/api/3/gdpr/commissioners";

/// GET, `Homeworks`.
pub const HOMEWORKS: &str = "/api/3/homeworks";

/// GET, number of homework not yet done.
pub const HOMEWORK_COUNT_ACTUAL: &str = "/api/3/homework/count-actual";

/// PUT, mark one homework done or not done.
pub const HOMEWORK_DONE: &str = "/api/3/homeworks/{homework_id}/student-done/{done}";

/// GET, `Subjects` with their marks.
pub const MARKS: &str = "/api/3/marks";

/// GET, `CertificateTerms`.
pub const MARKS_FINAL: &str = "/api/3/marks/final";

/// GET, `PedagogicalMeasures`.
pub const MARKS_MEASURES: &str = "/api/3/marks/measures";

/// GET, number of unseen marks.
pub const MARKS_COUNT_NEW: &str = "/api/3/marks/count-new";

/// GET, `Changes` to the timetable.
pub const SUBSTITUTIONS: &str = "/api/3/substitutions";

/// GET, timetable of the given kind.
pub const TIMETABLE: &str = "/api/3/timetable/{kind}";

/// POST, received `Messages`.
pub const MESSAGES_RECEIVED: &str = "/api/3/komens/messages/received";

/// POST, noticeboard `Messages`.
pub const MESSAGES_NOTICEBOARD: &str = "/api/3/komens/messages/noticeboard";

/// GET, raw attachment bytes.
pub const ATTACHMENT: &str = "/api/3/komens/attachment/{attachment_id}";
