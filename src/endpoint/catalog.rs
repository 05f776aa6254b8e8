//! Built-in Microsoft Graph directory catalog
//!
//! Collection and singleton endpoints fetched unconditionally at crawl start,
//! plus the child endpoints generated for each identifier of a given
//! resource type.

pub const DEFAULT_BASE_URL: &str = "https://graph.microsoft.com/v1.0";

pub(crate) const ROOTS: &[&str] = &[
    "/users",
    "/groups",
    "/applications",
    "/servicePrincipals",
    "/me",
    "/devices",
    "/organization",
    "/reports",
    "/security/alerts",
    "/directoryRoles",
    "/teams",
    "/policies/authorizationPolicy",
    "/policies/claimsMappingPolicies",
    "/policies/conditionalAccessPolicies",
    "/policies/tokenIssuancePolicies",
    "/policies/tokenLifetimePolicies",
    "/policies/activityBasedTimeoutPolicies",
    "/policies/appManagementPolicies",
    "/identity/conditionalAccess/policies",
    "/identity/b2xUserFlows",
    "/identity/b2cUserFlows",
    "/identityGovernance/entitlementManagement",
    "/identityGovernance/accessReviews",
    "/identityGovernance/lifecycleWorkflows",
    "/identityGovernance/termsOfUse",
    "/me/joinedTeams",
    "/me/mailFolders",
    "/me/onenote",
    "/me/drive",
];

pub(crate) const TEMPLATES: &[(&str, &[&str])] = &[
    (
        "user",
        &[
            "/users/{id}/manager",
            "/users/{id}/memberOf",
            "/users/{id}/transitiveMemberOf",
            "/users/{id}/ownedObjects",
            "/users/{id}/createdObjects",
            "/users/{id}/calendar",
            "/users/{id}/events",
            "/users/{id}/messages",
            "/users/{id}/contacts",
            "/users/{id}/joinedTeams",
            "/users/{id}/ownedDevices",
            "/users/{id}/registeredDevices",
            "/users/{id}/authentication",
            "/users/{id}/mailFolders",
            "/users/{id}/people",
            "/users/{id}/planner",
            "/users/{id}/calendarView",
            "/users/{id}/inferenceClassification",
            "/users/{id}/settings",
            "/users/{id}/drive",
            "/users/{id}/extensions",
            "/users/{id}/calendarGroups",
            "/users/{id}/outlook",
        ],
    ),
    (
        "group",
        &[
            "/groups/{id}/members",
            "/groups/{id}/owners",
            "/groups/{id}/calendar",
            "/groups/{id}/events",
            "/groups/{id}/transitiveMembers",
            "/groups/{id}/team",
            "/groups/{id}/settings",
            "/groups/{id}/conversations",
            "/groups/{id}/threads",
            "/groups/{id}/photos",
            "/groups/{id}/calendarView",
            "/groups/{id}/drive",
            "/groups/{id}/extensions",
            "/groups/{id}/sites",
        ],
    ),
    (
        "application",
        &[
            "/applications/{id}/owners",
            "/applications/{id}/tokenIssuancePolicies",
            "/applications/{id}/tokenLifetimePolicies",
            "/applications/{id}/appRoleAssignedTo",
            "/applications/{id}/appRoleAssignments",
            "/applications/{id}/synchronization",
            "/applications/{id}/addKey",
            "/applications/{id}/addPassword",
            "/applications/{id}/removeKey",
            "/applications/{id}/removePassword",
        ],
    ),
    (
        "servicePrincipal",
        &[
            "/servicePrincipals/{id}/owners",
            "/servicePrincipals/{id}/appRoleAssignedTo",
            "/servicePrincipals/{id}/appRoleAssignments",
            "/servicePrincipals/{id}/oauth2PermissionGrants",
            "/servicePrincipals/{id}/claimsMappingPolicies",
            "/servicePrincipals/{id}/tokenIssuancePolicies",
            "/servicePrincipals/{id}/tokenLifetimePolicies",
            "/servicePrincipals/{id}/federatedIdentityCredentials",
            "/servicePrincipals/{id}/transitiveMemberOf",
            "/servicePrincipals/{id}/memberOf",
            "/servicePrincipals/{id}/synchronization",
            "/servicePrincipals/{id}/addKey",
            "/servicePrincipals/{id}/addPassword",
            "/servicePrincipals/{id}/removeKey",
            "/servicePrincipals/{id}/removePassword",
        ],
    ),
    (
        "device",
        &[
            "/devices/{id}/registeredOwners",
            "/devices/{id}/registeredUsers",
            "/devices/{id}/transitiveMemberOf",
            "/devices/{id}/extensions",
            "/devices/{id}/commands",
            "/devices/{id}/deviceConfigurationStates",
        ],
    ),
    (
        "team",
        &[
            "/teams/{id}/channels",
            "/teams/{id}/members",
            "/teams/{id}/tags",
            "/teams/{id}/tags/{tagId}/members",
            "/teams/{id}/installedApps",
            "/teams/{id}/schedule",
            "/teams/{id}/primaryChannel",
        ],
    ),
    (
        "directoryRole",
        &["/directoryRoles/{id}/members", "/directoryRoles/{id}/owners"],
    ),
    (
        "organization",
        &["/organization/{id}/branding", "/organization/{id}/settings"],
    ),
    (
        "securityAlert",
        &[
            "/security/alerts/{id}/comments",
            "/security/alerts/{id}/feedback",
            "/security/alerts/{id}/redirect",
            "/security/alerts/{id}/alerts",
        ],
    ),
    (
        "report",
        &[
            "/reports/getTeamsUserActivityUserDetail(period='{period}')",
            "/reports/getOffice365ActiveUserDetail(period='{period}')",
            "/reports/getEmailActivityUserDetail(period='{period}')",
            "/reports/getSharePointSiteUsageDetail(period='{period}')",
        ],
    ),
    (
        "policy",
        &[
            "/policies/authorizationPolicy",
            "/policies/claimsMappingPolicies",
            "/policies/conditionalAccessPolicies",
            "/policies/tokenIssuancePolicies",
            "/policies/tokenLifetimePolicies",
            "/policies/activityBasedTimeoutPolicies",
            "/policies/appManagementPolicies",
        ],
    ),
];

/// Reporting period accepted by every report function in the table
pub(crate) const BINDINGS: &[(&str, &str)] = &[("period", "D7")];

/// Resources whose type is not named by their first path segment
pub(crate) const PREFIXES: &[(&str, &str)] = &[("/security/alerts", "securityAlert")];
